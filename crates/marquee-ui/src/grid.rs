//! Grid widget containing launcher tiles
//!
//! Tiles live for the lifetime of the window; visibility changes detach
//! hidden tiles from the grid and re-attach the visible subset at
//! freshly-computed (row, col) cells.

use gtk4::glib;
use gtk4::prelude::*;
use gtk4::subclass::prelude::*;
use marquee_core::assign_cells;
use marquee_util::EntryId;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::tile::LauncherTile;

mod imp {
    use super::*;

    type LaunchCallback = Rc<RefCell<Option<Box<dyn Fn(EntryId) + 'static>>>>;

    pub struct LauncherGrid {
        pub grid: gtk4::Grid,
        pub scrolled: gtk4::ScrolledWindow,
        pub tiles: RefCell<Vec<LauncherTile>>,
        pub on_launch: LaunchCallback,
        pub columns: Cell<u32>,
    }

    impl Default for LauncherGrid {
        fn default() -> Self {
            Self {
                grid: gtk4::Grid::new(),
                scrolled: gtk4::ScrolledWindow::new(),
                tiles: RefCell::new(Vec::new()),
                on_launch: Rc::new(RefCell::new(None)),
                columns: Cell::new(5),
            }
        }
    }

    #[glib::object_subclass]
    impl ObjectSubclass for LauncherGrid {
        const NAME: &'static str = "MarqueeLauncherGrid";
        type Type = super::LauncherGrid;
        type ParentType = gtk4::Box;
    }

    impl ObjectImpl for LauncherGrid {
        fn constructed(&self) {
            self.parent_constructed();

            let obj = self.obj();
            obj.set_orientation(gtk4::Orientation::Vertical);
            obj.set_hexpand(true);
            obj.set_vexpand(true);

            self.grid.set_row_spacing(10);
            self.grid.set_column_spacing(10);
            self.grid.set_halign(gtk4::Align::Center);
            self.grid.set_valign(gtk4::Align::Start);
            self.grid.add_css_class("launcher-grid");

            self.scrolled
                .set_policy(gtk4::PolicyType::Never, gtk4::PolicyType::Automatic);
            self.scrolled.set_child(Some(&self.grid));
            self.scrolled.set_hexpand(true);
            self.scrolled.set_vexpand(true);

            obj.append(&self.scrolled);
        }
    }

    impl WidgetImpl for LauncherGrid {}
    impl BoxImpl for LauncherGrid {}
}

glib::wrapper! {
    pub struct LauncherGrid(ObjectSubclass<imp::LauncherGrid>)
        @extends gtk4::Box, gtk4::Widget,
        @implements gtk4::Accessible, gtk4::Buildable, gtk4::ConstraintTarget, gtk4::Orientable;
}

impl LauncherGrid {
    pub fn new(columns: u32) -> Self {
        let grid: Self = glib::Object::builder().build();
        grid.imp().columns.set(columns.max(1));
        grid
    }

    /// Set the callback for when a tile's launch control is activated
    pub fn connect_launch<F: Fn(EntryId) + 'static>(&self, callback: F) {
        *self.imp().on_launch.borrow_mut() = Some(Box::new(callback));
    }

    /// Install the full tile set, in catalog order. All tiles start visible.
    pub fn set_tiles(&self, tiles: Vec<LauncherTile>) {
        let imp = self.imp();

        for tile in &tiles {
            let on_launch = imp.on_launch.clone();
            tile.connect_clicked(move |tile| {
                if let Some(entry_id) = tile.entry_id()
                    && let Some(callback) = on_launch.borrow().as_ref()
                {
                    callback(entry_id);
                }
            });
        }

        *imp.tiles.borrow_mut() = tiles;
        let visible = vec![true; imp.tiles.borrow().len()];
        self.rebuild(&visible);
    }

    /// Rebuild row/column assignment from scratch for the visible subset.
    /// `visible` flags are in tile (catalog) order.
    pub fn rebuild(&self, visible: &[bool]) {
        let imp = self.imp();
        let tiles = imp.tiles.borrow();

        // Detach everything, then re-attach the visible subset row-major
        while let Some(child) = imp.grid.first_child() {
            imp.grid.remove(&child);
        }

        let shown: Vec<&LauncherTile> = tiles
            .iter()
            .zip(visible)
            .filter_map(|(tile, v)| v.then_some(tile))
            .collect();

        let cells = assign_cells(shown.len(), imp.columns.get());
        for (tile, cell) in shown.iter().zip(&cells) {
            imp.grid.attach(*tile, cell.col, cell.row, 1, 1);
        }
    }

    pub fn tile_for(&self, entry_id: &EntryId) -> Option<LauncherTile> {
        self.imp()
            .tiles
            .borrow()
            .iter()
            .find(|tile| tile.entry_id().as_ref() == Some(entry_id))
            .cloned()
    }
}

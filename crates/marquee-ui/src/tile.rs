//! Individual tile widget for the launcher grid

use gtk4::glib;
use gtk4::prelude::*;
use gtk4::subclass::prelude::*;
use marquee_util::EntryId;
use std::cell::RefCell;

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct LauncherTile {
        pub entry_id: RefCell<Option<EntryId>>,
        pub icon: gtk4::Image,
        pub name_label: gtk4::Label,
        pub action_label: gtk4::Label,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for LauncherTile {
        const NAME: &'static str = "MarqueeLauncherTile";
        type Type = super::LauncherTile;
        type ParentType = gtk4::Button;
    }

    impl ObjectImpl for LauncherTile {
        fn constructed(&self) {
            self.parent_constructed();

            let obj = self.obj();

            let content = gtk4::Box::new(gtk4::Orientation::Vertical, 8);
            content.set_halign(gtk4::Align::Center);
            content.set_valign(gtk4::Align::Center);

            self.icon.set_pixel_size(80);
            self.icon.set_icon_name(Some("input-gaming"));
            content.append(&self.icon);

            self.name_label.set_wrap(true);
            self.name_label.set_wrap_mode(gtk4::pango::WrapMode::Word);
            self.name_label.set_justify(gtk4::Justification::Center);
            self.name_label.set_max_width_chars(14);
            self.name_label.add_css_class("tile-name");
            content.append(&self.name_label);

            self.action_label.set_text("Launch");
            self.action_label.add_css_class("tile-action");
            content.append(&self.action_label);

            obj.set_child(Some(&content));
            obj.add_css_class("launcher-tile");
            obj.set_size_request(140, 160);
        }
    }

    impl WidgetImpl for LauncherTile {}
    impl ButtonImpl for LauncherTile {}
}

glib::wrapper! {
    pub struct LauncherTile(ObjectSubclass<imp::LauncherTile>)
        @extends gtk4::Button, gtk4::Widget,
        @implements gtk4::Accessible, gtk4::Actionable, gtk4::Buildable, gtk4::ConstraintTarget;
}

impl LauncherTile {
    pub fn new() -> Self {
        glib::Object::builder().build()
    }

    /// Bind the tile to an entry and its background CSS class
    pub fn bind(&self, entry_id: EntryId, display_name: &str, bg_class: &str) {
        let imp = self.imp();
        imp.name_label.set_text(display_name);
        *imp.entry_id.borrow_mut() = Some(entry_id);
        self.add_css_class(bg_class);
    }

    /// Show the resolved icon, or keep the fallback glyph
    pub fn set_icon_paintable(&self, paintable: Option<&impl IsA<gtk4::gdk::Paintable>>) {
        match paintable {
            Some(paintable) => self.imp().icon.set_from_paintable(Some(paintable)),
            None => self.imp().icon.set_icon_name(Some("input-gaming")),
        }
    }

    /// Flip the launch control between "Launch" and "Running.."
    pub fn set_running(&self, running: bool) {
        let text = if running { "Running.." } else { "Launch" };
        self.imp().action_label.set_text(text);
    }

    pub fn entry_id(&self) -> Option<EntryId> {
        self.imp().entry_id.borrow().clone()
    }
}

impl Default for LauncherTile {
    fn default() -> Self {
        Self::new()
    }
}

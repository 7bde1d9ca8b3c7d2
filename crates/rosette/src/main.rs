use relm4::prelude::*;
use rosette::gui::app::AppModel;
use rosette::store;
use rosette::sys::runtime;

fn main() {
    env_logger::init();

    let document = store::load_or_default();

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.atelier.rosette");

    app.run::<AppModel>((document, rx));
}

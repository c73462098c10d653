mod api;
mod components;
mod state;

use dioxus::prelude::*;

/// Owner for tasks created from this UI. Which user is signed in is the
/// embedding application's concern; a fixed owner stands in for it here.
const DEFAULT_OWNER_ID: u32 = 1;

static CSS: Asset = asset!("assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Stylesheet { href: CSS }
        components::TaskList { title: "ToDoList", owner_id: DEFAULT_OWNER_ID }
    }
}

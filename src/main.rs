mod bitmap;
mod canvas;
mod components;
mod config;
mod input;
mod led;
mod model;
mod render;
mod state;
mod util;

use components::app::App;

fn main() {
    yew::Renderer::<App>::new().render();
}

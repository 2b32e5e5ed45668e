use super::pixel_view::PixelView;
use crate::config::Settings;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let settings = use_reducer(Settings::load);

    // Persist settings changes
    {
        let current = (*settings).clone();
        use_effect_with(current, move |s| {
            s.save();
            || ()
        });
    }

    html! {
        <div id="root">
            <PixelView settings={settings.clone()} />
        </div>
    }
}

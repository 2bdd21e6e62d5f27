/// Reusable UI components

use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::storage::PALETTE;

#[derive(Properties, PartialEq)]
pub struct ColorSelectProps {
    /// Currently chosen color, empty when none
    pub selected: AttrValue,
    pub on_change: Callback<String>,
    #[prop_or(false)]
    pub disabled: bool,
}

#[function_component(ColorSelect)]
pub fn color_select(props: &ColorSelectProps) -> Html {
    let onchange = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
                on_change.emit(select.value());
            }
        })
    };

    html! {
        <select id="dropdown" class="color-select" {onchange} disabled={props.disabled}>
            <option value="" selected={props.selected.is_empty()} disabled={true}>
                {"Choose a color"}
            </option>
            {for PALETTE.iter().map(|color| html! {
                <option key={*color} value={*color} selected={props.selected.as_str() == *color}>
                    {*color}
                </option>
            })}
        </select>
    }
}

/// Inline-styled components for use inside the YouTube page,
/// where the extension stylesheet is not loaded

use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ButtonProps {
    pub onclick: Callback<MouseEvent>,
    pub children: Children,
    #[prop_or(false)]
    pub disabled: bool,
    #[prop_or_default]
    pub variant: ButtonVariant,
}

#[derive(PartialEq, Clone, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
}

#[function_component(Button)]
pub fn button(props: &ButtonProps) -> Html {
    let base_style = "padding: 8px 16px; border: none; border-radius: 2px; font-size: 14px; cursor: pointer; font-weight: 500; margin-left: 8px;";

    let variant_style = match props.variant {
        ButtonVariant::Primary => "background-color: #cc0000; color: white;",
        ButtonVariant::Secondary => "background-color: #e0e0e0; color: #333;",
    };

    let disabled_style = if props.disabled {
        "opacity: 0.5; cursor: not-allowed;"
    } else {
        ""
    };

    let style = format!("{} {} {}", base_style, variant_style, disabled_style);

    html! {
        <button
            type="button"
            onclick={props.onclick.clone()}
            disabled={props.disabled}
            style={style}
        >
            {props.children.clone()}
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub struct TextFieldProps {
    pub label: AttrValue,
    pub value: AttrValue,
    pub oninput: Callback<String>,
    #[prop_or_default]
    pub placeholder: AttrValue,
}

/// Labelled text input reporting its value on every keystroke
#[function_component(TextField)]
pub fn text_field(props: &TextFieldProps) -> Html {
    let oninput = {
        let callback = props.oninput.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                callback.emit(input.value());
            }
        })
    };

    html! {
        <label style="display: block; margin-bottom: 12px; font-size: 13px; color: #606060;">
            {props.label.clone()}
            <input
                type="text"
                value={props.value.clone()}
                placeholder={props.placeholder.clone()}
                oninput={oninput}
                style="display: block; width: 100%; box-sizing: border-box; margin-top: 4px; padding: 6px 8px; font-size: 14px; border: 1px solid #ccc; border-radius: 2px;"
            />
        </label>
    }
}

#[derive(Properties, PartialEq)]
pub struct AlertProps {
    pub message: String,
}

/// Error banner
#[function_component(Alert)]
pub fn alert(props: &AlertProps) -> Html {
    html! {
        <div style="padding: 8px 12px; background-color: #ffebee; border-left: 4px solid #f44336; margin: 0 0 12px 0; font-size: 13px;">
            {&props.message}
        </div>
    }
}

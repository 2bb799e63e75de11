use uuid::Uuid;
use yew::{classes, html, Callback, Children, Component, Context, Html, MouseEvent, Properties};

/// Sheet sliding down from the top of the viewport, used for every modal dialog.
///
/// Visibility is driven entirely by the `open` prop: the sheet stays in the DOM
/// and toggles its `show` class, so CSS transitions run in both directions.
pub struct YwMaterialTopSheet {
    pub id: String,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub children: Children,
    pub open: bool,
    pub title: String,
    /// Emitted by the close button and by clicks on the backdrop.
    pub on_close: Callback<()>,
}

impl Component for YwMaterialTopSheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("id-{}", Uuid::new_v4()),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let title_id = format!("{}-title", self.id);
        let on_backdrop = props.on_close.reform(|_: MouseEvent| ());
        let on_button = props.on_close.reform(|_: MouseEvent| ());

        html! {
            <div class={classes!("top-sheet-backdrop", props.open.then_some("show"))} onclick={on_backdrop}>
                <div
                    class={classes!("top-sheet", props.open.then_some("show"))}
                    id={self.id.clone()}
                    role="dialog"
                    aria-modal="true"
                    aria-labelledby={title_id.clone()}
                    aria-hidden={(!props.open).to_string()}
                    onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}
                >
                    <header class="top-sheet-header">
                        <h2 id={title_id}>{ props.title.clone() }</h2>
                        <button type="button" class="top-sheet-close" title="Cerrar" onclick={on_button}>
                            { "✕" }
                        </button>
                    </header>
                    { if props.open { html! { <>{ for props.children.iter() }</> } } else { html! {} } }
                </div>
            </div>
        }
    }
}

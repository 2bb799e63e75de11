use yew::{html, Children, Component, Context, Html, Properties};

#[derive(Properties, PartialEq)]
pub struct WorkspaceGridProps {
    /// Column count at full width; the grid wraps to fewer on narrow screens.
    pub columns: usize,
    #[prop_or_default]
    pub class: Option<&'static str>,
    pub children: Children,
}

/// Responsive grid laying out stat cards and metric tiles.
pub struct WorkspaceGrid;

impl Component for WorkspaceGrid {
    type Message = ();
    type Properties = WorkspaceGridProps;

    fn create(_ctx: &Context<Self>) -> Self {
        WorkspaceGrid
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let style = format!(
            "display: grid;
             grid-template-columns: repeat(auto-fit, minmax(max(12rem, calc(100% / {} - 1rem)), 1fr));
             gap: 1rem;
             margin: 1rem 0;",
            props.columns.max(1)
        );

        html! {
            <div class={props.class.unwrap_or("workspace-grid")} style={style}>
                { for props.children.iter() }
            </div>
        }
    }
}

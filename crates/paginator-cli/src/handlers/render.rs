use crate::cli::{RenderArgs, StateArgs};
use crate::output;
use paginator_core::{
    Control, ControlOverride, PaginationState, PaginatorConfig, PaginatorResult,
};
use paginator_domain::{Paginator, RenderedPaginator};
use serde::Serialize;

#[derive(Serialize)]
pub struct RenderResponse {
    pub state: PaginationState,
    #[serde(flatten)]
    pub rendered: RenderedPaginator,
}

pub fn state_from_args(args: &StateArgs) -> PaginatorResult<PaginationState> {
    let base = args.base();
    PaginationState::for_records(
        base,
        args.total_records,
        args.page_size,
        args.current_page.unwrap_or(base.first_page()),
    )
}

pub fn handle(mut config: PaginatorConfig, args: RenderArgs) -> anyhow::Result<()> {
    args.layout.apply(&mut config);
    if args.no_indexed {
        config.render_indexed_page_handles = false;
    }
    for control in &args.disabled {
        *config.controls.get_mut(Control::from(*control)) = ControlOverride::disabled();
    }

    match render(config, &args.state) {
        Ok(response) => output::output_success(response),
        Err(e) => output::output_error(&e.to_string()),
    }
}

fn render(config: PaginatorConfig, args: &StateArgs) -> PaginatorResult<RenderResponse> {
    let state = state_from_args(args)?;
    let rendered = Paginator::new(config)?.render(&state);
    Ok(RenderResponse { state, rendered })
}

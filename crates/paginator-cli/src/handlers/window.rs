use crate::cli::WindowArgs;
use crate::output;
use paginator_core::{PageBase, PageSize, PageWindow, PaginationState, PaginatorConfig, PaginatorResult};
use paginator_domain::Paginator;
use serde::Serialize;

#[derive(Serialize)]
pub struct WindowResponse {
    #[serde(flatten)]
    pub window: PageWindow,
    /// Window pages in the collection's numbering.
    pub pages: Vec<usize>,
}

pub fn handle(mut config: PaginatorConfig, args: WindowArgs) -> anyhow::Result<()> {
    args.layout.apply(&mut config);
    match compute(config, &args) {
        Ok(response) => output::output_success(response),
        Err(e) => output::output_error(&e.to_string()),
    }
}

fn compute(config: PaginatorConfig, args: &WindowArgs) -> PaginatorResult<WindowResponse> {
    let base = PageBase::try_from(args.first_page)?;
    let total_pages = args
        .last_page
        .saturating_add(1)
        .saturating_sub(base.first_page());
    let state = PaginationState::new(
        base,
        args.last_page,
        args.current_page,
        total_pages,
        0,
        PageSize::default(),
    )?;

    let window = Paginator::new(config)?.window(&state);
    Ok(WindowResponse {
        window,
        pages: window.range().map(|index| state.rebase(index)).collect(),
    })
}

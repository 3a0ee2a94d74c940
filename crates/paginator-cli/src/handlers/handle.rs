use crate::cli::HandleArgs;
use crate::handlers::render::state_from_args;
use crate::output;
use paginator_core::PaginatorResult;
use paginator_domain::{HandleOptions, HandleTitle, PageHandle};

pub fn handle(args: HandleArgs) -> anyhow::Result<()> {
    match describe(args) {
        Ok(handle) => output::output_success(handle),
        Err(e) => output::output_error(&e.to_string()),
    }
}

fn describe(args: HandleArgs) -> PaginatorResult<PageHandle> {
    let state = state_from_args(&args.state)?;
    let options = HandleOptions {
        page_index: args.page_index,
        label: args.label,
        title: args.title.map(HandleTitle::from),
        is_rewind: args.rewind,
        is_back: args.back,
        is_forward: args.forward,
        is_fast_forward: args.fast_forward,
    };
    PageHandle::from_options(&state, options)
}

use clap::{Args, Parser, Subcommand, ValueEnum};
use paginator_core::{Control, PageBase, PageSize, PaginatorConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "paginator")]
#[command(about = "Sliding-window pagination controls", long_about = None)]
#[command(version, arg_required_else_help = false)]
pub struct Cli {
    /// Path to a TOML config file (or set PAGINATOR_CONFIG env var)
    #[arg(long, value_name = "FILE", env = "PAGINATOR_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the visible page window
    Window(WindowArgs),
    /// Render the page handles, summary and page size options
    Render(RenderArgs),
    /// Describe a single page handle
    Handle(HandleArgs),
    /// Browse a generated collection in the terminal
    Browse(BrowseArgs),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Window geometry overrides applied on top of the config file.
#[derive(Args, Default)]
pub struct LayoutArgs {
    #[arg(long)]
    pub window_size: Option<usize>,
    #[arg(long)]
    pub slide_scale: Option<f64>,
}

impl LayoutArgs {
    pub fn apply(&self, config: &mut PaginatorConfig) {
        if let Some(window_size) = self.window_size {
            config.window_size = window_size;
        }
        if let Some(slide_scale) = self.slide_scale {
            config.slide_scale = slide_scale;
        }
    }
}

/// A collection described by its record count.
#[derive(Args)]
pub struct StateArgs {
    /// Index base of the collection
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(0..=1))]
    pub first_page: u8,
    #[arg(long)]
    pub total_records: usize,
    /// Records per page, or "all"
    #[arg(long, default_value = "25")]
    pub page_size: PageSize,
    /// Defaults to the first page
    #[arg(long)]
    pub current_page: Option<usize>,
}

impl StateArgs {
    pub fn base(&self) -> PageBase {
        if self.first_page == 0 {
            PageBase::Zero
        } else {
            PageBase::One
        }
    }
}

#[derive(Args)]
pub struct WindowArgs {
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(0..=1))]
    pub first_page: u8,
    #[arg(long)]
    pub last_page: usize,
    #[arg(long)]
    pub current_page: usize,
    #[command(flatten)]
    pub layout: LayoutArgs,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ControlArg {
    Rewind,
    Back,
    Forward,
    FastForward,
}

impl From<ControlArg> for Control {
    fn from(arg: ControlArg) -> Self {
        match arg {
            ControlArg::Rewind => Control::Rewind,
            ControlArg::Back => Control::Back,
            ControlArg::Forward => Control::Forward,
            ControlArg::FastForward => Control::FastForward,
        }
    }
}

#[derive(Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub state: StateArgs,
    #[command(flatten)]
    pub layout: LayoutArgs,
    /// Only render the fixed controls
    #[arg(long)]
    pub no_indexed: bool,
    /// Turn off a fixed control (repeatable)
    #[arg(long = "disable", value_enum)]
    pub disabled: Vec<ControlArg>,
}

#[derive(Args)]
pub struct HandleArgs {
    #[command(flatten)]
    pub state: StateArgs,
    /// 0-based window index for a discrete page handle
    #[arg(long)]
    pub page_index: Option<usize>,
    #[arg(long)]
    pub label: Option<String>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub rewind: bool,
    #[arg(long)]
    pub back: bool,
    #[arg(long)]
    pub forward: bool,
    #[arg(long)]
    pub fast_forward: bool,
}

#[derive(Args)]
pub struct BrowseArgs {
    /// Number of generated records
    #[arg(long, default_value_t = 250)]
    pub records: usize,
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(0..=1))]
    pub first_page: u8,
    #[arg(long, default_value = "10")]
    pub page_size: PageSize,
    #[command(flatten)]
    pub layout: LayoutArgs,
}

impl Default for BrowseArgs {
    fn default() -> Self {
        Self {
            records: 250,
            first_page: 1,
            page_size: PageSize::Records(10),
            layout: LayoutArgs::default(),
        }
    }
}

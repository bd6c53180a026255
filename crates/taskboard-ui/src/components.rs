mod error_banner;
mod filter_tabs;
mod task_card;
mod task_form;
mod task_list;
mod task_stats;

pub use error_banner::ErrorBanner;
pub use filter_tabs::FilterTabs;
pub use task_card::TaskCard;
pub use task_form::TaskForm;
pub use task_list::TaskList;
pub use task_stats::TaskStats;

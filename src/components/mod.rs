//! UI Components
//!
//! Portal pages and the widgets they share.

mod dashboard_page;
mod data_generation_page;
mod data_modeling_page;
mod job_status;
mod nav_bar;
mod segment_predictor;
mod stat_panel;
mod top_customers_panel;
mod trigger_card;

pub use dashboard_page::DashboardPage;
pub use data_generation_page::DataGenerationPage;
pub use data_modeling_page::DataModelingPage;
pub use job_status::{use_job_runner, JobStatusLine};
pub use nav_bar::NavBar;
pub use segment_predictor::SegmentPredictor;
pub use stat_panel::StatPanel;
pub use top_customers_panel::TopCustomersPanel;
pub use trigger_card::TriggerCard;

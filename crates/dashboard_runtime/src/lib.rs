pub mod model;
pub mod normalize;
pub mod reducer;
pub mod store;
pub mod surface;

pub use model::DashboardState;
pub use normalize::normalize_payload;
pub use reducer::{reduce_dashboard, DashboardAction, DashboardError, RuntimeEffect};
pub use store::StoreOwner;
pub use surface::DashboardSurface;

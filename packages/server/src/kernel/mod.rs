// External collaborator seams
//
// Everything the server talks to besides Postgres lives behind a trait here
// so that tests and unconfigured deployments can inject a no-op.

pub mod city_feed;
pub mod deps;
pub mod mailer;
pub mod schema_probe;
pub mod traits;

pub use city_feed::{HttpCityFeed, StaticCityFeed};
pub use deps::ServerDeps;
pub use mailer::{ApiMailer, NoopMailer};
pub use schema_probe::SchemaCapabilities;
pub use traits::{BaseCityFeed, BaseMailer};

//! Domain model for proactive task notifications.

mod business_hours;
mod hour;
mod message;
mod outcome;
mod settings;

pub use business_hours::{BusinessHours, DailyWindow};
pub use hour::{HourBucket, ParseHourBucketError};
pub use message::{NOTIFICATION_TAG, Notification, RenderError};
pub use outcome::GateOutcome;
pub use settings::GateSettings;

// Services layer for business logic
// Services own business logic and validation, calling storage and
// collaborators directly

pub mod event;
pub mod intake;
pub mod notification;
pub mod review;

pub use event::EventService;
pub use intake::IntakeService;
pub use notification::NotificationService;
pub use review::ReviewService;

pub mod faq;
pub mod reschedule;
pub mod ticket_image;
pub mod voice;

pub use faq::FaqTool;
pub use reschedule::RescheduleTool;
pub use ticket_image::TicketImageTool;
pub use voice::VoiceTool;

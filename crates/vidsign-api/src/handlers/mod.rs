pub mod files;
pub mod sign_video;
pub mod verify_video;

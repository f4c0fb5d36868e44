pub mod guest_display;

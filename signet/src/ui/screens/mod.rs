pub mod sign_in_screen;

pub mod generation_handler;

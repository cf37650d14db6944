pub mod input_server;

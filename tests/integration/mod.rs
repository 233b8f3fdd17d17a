//! Integration tests for key generation against stand-in ssh-keygen executables

mod availability;
mod cli;
mod generate_flow;

pub mod fishnik;

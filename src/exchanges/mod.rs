pub mod okx;

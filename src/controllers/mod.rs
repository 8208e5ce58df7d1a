pub mod calc_controller;

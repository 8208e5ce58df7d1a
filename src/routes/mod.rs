pub mod calc_routes;

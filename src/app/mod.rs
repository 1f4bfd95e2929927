pub mod polygon_service;

pub mod make_service;

pub mod draft_service;

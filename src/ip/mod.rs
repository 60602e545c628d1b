mod external;

pub use external::get_external_ip;

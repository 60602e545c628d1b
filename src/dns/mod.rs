mod cloudflare;
mod provider;

pub use cloudflare::CloudflareProvider;
pub use provider::{Credentials, DnsProvider, DnsRecord};

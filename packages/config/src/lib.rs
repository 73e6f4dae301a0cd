// ABOUTME: Shared configuration names for Folio
// ABOUTME: Every environment variable read by the gateway or the content server is declared here

pub mod constants;

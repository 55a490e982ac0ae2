pub mod analyzers;
pub mod config;
pub mod error;
pub mod extractor;
pub mod fetch;
pub mod observation;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod registry;
pub mod store;
pub mod synthetic;

pub mod gtfs_rt {
    include!(concat!(env!("OUT_DIR"), "/transit_realtime.rs"));
}

// Application layer: concrete pipelines wired from adapters and extractors.

pub mod pipelines;

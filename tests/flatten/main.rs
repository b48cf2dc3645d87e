mod output;
mod sampling;
mod scenario;
mod snapshot;

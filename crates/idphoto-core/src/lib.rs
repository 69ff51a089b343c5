pub mod compose;
pub mod consts;
pub mod crop;
pub mod detection;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod raster;
pub mod removal;
pub mod session;

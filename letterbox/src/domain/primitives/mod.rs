pub mod size;

pub use size::{
    ImageSize, ImageSpace, Size, SurfaceSize, SurfaceSpace, BYTES_PER_PIXEL, MAX_FRAME_BYTES,
    MAX_FRAME_PIXELS,
};

// Analysis configuration

// Transform size of the frequency analysis stage; the spectrum carries
// half as many magnitude bytes.
pub const FFT_SIZE: usize = 512;
pub const SPECTRUM_BINS: usize = FFT_SIZE / 2;

// Streamed audio file used by the file source.
pub const STREAM_URL: &str = "https://cdn.pixabay.com/audio/2024/09/27/audio_8cb2279810.mp3";

// Normalized volume below which a sphere snaps to its resting scale.
pub const VOLUME_THRESHOLD: f32 = 0.05;
// Gain applied to normalized volume when computing the peak scale.
pub const VOLUME_AMPLIFICATION: f32 = 8.0;

// Copy spawning: eligible above this fraction of the peak scale, taken
// with this per-frame probability.
pub const COPY_SPAWN_RATIO: f32 = 0.9;
pub const COPY_SPAWN_CHANCE: f32 = 0.1;

// Sphere field
pub const SPHERE_COUNT: usize = 256;
pub const SPHERE_BASE_SCALE: f32 = 0.05;
pub const SPHERE_BASE_RADIUS: f32 = 1.0;
pub const SPHERE_RADIUS_SPREAD: f32 = 2.0;
pub const MIN_ROTATION_SPEED: f32 = 0.1;
pub const ROTATION_SPEED_SPREAD: f32 = 0.02;

// Copy fade-out
pub const FADE_DURATION_MS: f64 = 2000.0;
pub const COPY_OPACITY_RATIO: f32 = 0.6;

// Beam field
pub const BEAM_COUNT: usize = 64;
pub const BEAM_BASE_RADIUS: f32 = 0.1;
pub const BEAM_HEIGHT: f32 = 40.0;
pub const BEAM_SPACE_WIDTH: f32 = 20.0;
pub const BEAM_DISTANCE_FROM_CAMERA: f32 = 20.0;
pub const BEAM_VOLUME_THRESHOLD: f32 = 0.1;

// Camera
pub const CAMERA_Z: f32 = 5.0;
pub const CAMERA_FOVY_DEG: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Upper bound on instances uploaded per frame (field plus copy pool).
pub const MAX_INSTANCES: usize = 4096;

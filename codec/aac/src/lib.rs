pub mod adts;
pub mod audio_specific_config;
pub mod consts;
pub mod errors;
pub mod sampling_frequency_index;

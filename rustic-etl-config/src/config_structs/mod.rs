pub mod etl_config;

pub mod controls;
pub mod header;
pub mod station_list;

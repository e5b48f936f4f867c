pub mod fixed_plane_locator;

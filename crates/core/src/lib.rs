//! Skin-region scanning for AR tattoo placement.
//!
//! Camera frames are thresholded in YCrCb, cleaned up, reduced to external
//! contours, and the largest region's centre is projected onto a tracked
//! surface where a decal is placed.

pub mod shared {
    pub mod constants;
    pub mod frame;
    pub mod geometry;
    pub mod region;
    pub mod scan_config;
}

pub mod acquisition {
    pub mod domain {
        pub mod camera_image;
        pub mod camera_image_source;
    }
    pub mod frame_acquirer;
    pub mod infrastructure;
    #[cfg(test)]
    pub(crate) mod test_doubles;
}

pub mod detection {
    pub mod domain {
        pub mod color_space;
        pub mod contour;
        pub mod morphology;
        pub mod overlay_writer;
        pub mod region_overlay;
        pub mod region_selector;
        pub mod skin_detector;
        pub mod skin_mask;
    }
    pub mod infrastructure;
}

pub mod placement {
    pub mod domain {
        pub mod placement_target;
        pub mod screen_mapper;
        pub mod surface_locator;
    }
    pub mod infrastructure;
    pub mod placement_projector;
    pub mod tattoo_session;
}

pub mod pipeline {
    pub mod pipeline_logger;
    pub mod skin_scan_use_case;
    pub mod startup_gate;
    pub mod status_reporter;
}

pub mod chart;
pub mod html;
pub mod sections;
pub mod table;
pub mod zip;
pub mod zoom;

pub mod menu_navigation;
pub mod output_routing;

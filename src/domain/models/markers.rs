// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::SelectorSettings;

/// 页面标记
///
/// 扫描、注释和重定位共用的类名集合
#[derive(Debug, Clone)]
pub struct Markers {
    pub item_class: String,
    pub link_container_class: String,
    pub link_tag: String,
    pub facilities_class: String,
    pub annotation_class: String,
    pub pending_class: String,
    pub icon_class: String,
    pub option_class: String,
}

impl From<&SelectorSettings> for Markers {
    fn from(settings: &SelectorSettings) -> Self {
        Self {
            item_class: settings.item_class.clone(),
            link_container_class: settings.link_container_class.clone(),
            link_tag: "a".to_string(),
            facilities_class: settings.facilities_class.clone(),
            annotation_class: settings.annotation_class.clone(),
            pending_class: settings.pending_class.clone(),
            icon_class: settings.icon_class.clone(),
            option_class: settings.option_class.clone(),
        }
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            item_class: "propertyWrap".to_string(),
            link_container_class: "infoWrap".to_string(),
            link_tag: "a".to_string(),
            facilities_class: "facilities".to_string(),
            annotation_class: "added-floor-area".to_string(),
            pending_class: "floor-area-spinner".to_string(),
            icon_class: "icon-floor_area".to_string(),
            option_class: "opt".to_string(),
        }
    }
}

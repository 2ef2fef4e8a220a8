//! Content-type rules: layout template, then layer composition, then default.

use crate::rules::{Rule, RuleChain};
use crate::scene::{ContentType, Scene};

pub fn template_content(scene: &Scene) -> Option<ContentType> {
    let t = scene.template()?;
    let ct = match t {
        "hero" | "title-card" | "quote" | "statement" => ContentType::Typography,
        "portrait" | "profile" | "testimonial" => ContentType::Portrait,
        "split-panel" | "feature" | "product" => ContentType::Product,
        "chart" | "graph" | "metrics" => ContentType::DataVisualization,
        "device-mockup" | "dashboard" | "ui" => ContentType::Interface,
        "grid" | "gallery" | "collage" => ContentType::Gallery,
        "progress" | "loader" | "processing" => ContentType::Progress,
        _ => return None,
    };
    Some(ct)
}

pub fn has_chart_layer(scene: &Scene) -> bool {
    scene.count_kind("chart") + scene.count_kind("graph") > 0
}

pub fn has_progress_layer(scene: &Scene) -> bool {
    ["progress", "spinner", "loader"]
        .iter()
        .any(|k| scene.count_kind(k) > 0)
}

pub fn has_device_layer(scene: &Scene) -> bool {
    ["device", "screenshot", "browser"]
        .iter()
        .any(|k| scene.count_kind(k) > 0)
}

pub fn is_image_collection(scene: &Scene) -> bool {
    scene.count_kind("image") >= 3
}

pub fn is_single_image_with_caption(scene: &Scene) -> bool {
    scene.count_kind("image") == 1 && scene.count_kind("text") <= 1 && scene.layers.len() <= 2
}

pub fn is_image_and_text(scene: &Scene) -> bool {
    scene.count_kind("image") >= 1 && scene.count_kind("text") >= 1
}

pub fn is_text_only(scene: &Scene) -> bool {
    !scene.layers.is_empty() && scene.layers.iter().all(|l| l.is_kind("text"))
}

pub fn content_type_rules() -> RuleChain<Scene, ContentType> {
    RuleChain::new("default", ContentType::Generic, 0.3)
        .rule(Rule::extract("layout_template", template_content, 0.9))
        .rule(Rule::when("chart_layer", has_chart_layer, ContentType::DataVisualization, 0.75))
        .rule(Rule::when("progress_layer", has_progress_layer, ContentType::Progress, 0.75))
        .rule(Rule::when("device_layer", has_device_layer, ContentType::Interface, 0.7))
        .rule(Rule::when("image_collection", is_image_collection, ContentType::Gallery, 0.65))
        .rule(Rule::when(
            "single_image_with_caption",
            is_single_image_with_caption,
            ContentType::Portrait,
            0.6,
        ))
        .rule(Rule::when("image_and_text", is_image_and_text, ContentType::Product, 0.6))
        .rule(Rule::when("text_only", is_text_only, ContentType::Typography, 0.6))
}

//! Names, descriptions and reasons for composed outfits.
//!
//! Descriptions name the actual colors and pieces; reasons name the rule
//! that put them together (color theory, formality matching, layering).

use crate::formality;
use crate::palette::Harmony;
use crate::policy::CompatibilityPolicy;
use whatrobe_core::{Category, ClothingItem, Color, Preferences};

/// "Comfortable casual Outfit"
pub fn outfit_name(preferences: &Preferences) -> String {
    format!("{} {} Outfit", capitalize(&preferences.style), preferences.occasion)
}

/// "Elegant dinner Dress"
pub fn dress_name(preferences: &Preferences) -> String {
    format!("Elegant {} Dress", preferences.occasion)
}

/// "A black top with white bottoms, white shoes and a gray outer layer."
pub fn describe_items(items: &[&ClothingItem]) -> String {
    let Some((first, rest)) = items.split_first() else {
        return String::new();
    };

    let mut text = capitalize(&piece(first));
    if !rest.is_empty() {
        let pieces: Vec<String> = rest.iter().map(|item| piece(item)).collect();
        text.push_str(" with ");
        text.push_str(&join_list(&pieces));
    }
    text.push('.');
    text
}

/// Reason for a top + bottom outfit with optional shoes and layer.
pub fn explain_separates(
    policy: &CompatibilityPolicy,
    top: &ClothingItem,
    bottom: &ClothingItem,
    shoes: Option<&ClothingItem>,
    layer: Option<&ClothingItem>,
    weather: &str,
) -> String {
    let mut sentences = Vec::new();

    if let Some(harmony) = policy.color_harmony(top, bottom) {
        sentences.push(color_reason(harmony, top.color, bottom.color));
    }
    sentences.push(formality_reason(policy.formality_of(top), policy.formality_of(bottom)));

    if let Some(shoes) = shoes {
        sentences.push(format!(
            "The {} shoes stay within the same palette and formality range.",
            shoes.color
        ));
    }
    if let Some(layer) = layer {
        sentences.push(format!(
            "{} adds warmth for {} weather.",
            capitalize(&piece(layer)),
            weather
        ));
    }

    sentences.join(" ")
}

/// Reason for a dress look.
pub fn explain_dress(
    policy: &CompatibilityPolicy,
    dress: &ClothingItem,
    shoes: Option<&ClothingItem>,
) -> String {
    let mut text = "Dresses provide an elegant, all-in-one solution for the occasion.".to_string();
    if let Some(shoes) = shoes {
        if let Some(harmony) = policy.color_harmony(dress, shoes) {
            text.push(' ');
            text.push_str(&color_reason(harmony, dress.color, shoes.color));
        }
    }
    text
}

/// One sentence naming the color rule between `a` and `b`.
pub fn color_reason(harmony: Harmony, a: Color, b: Color) -> String {
    match harmony {
        Harmony::Identical => format!("Head-to-toe {} keeps the look tonal.", a),
        Harmony::Neutral if a.is_neutral() && b.is_neutral() => {
            format!("{} and {} are neutrals that pair with anything.", capitalize(a.to_string().as_str()), b)
        }
        Harmony::Neutral => {
            let (neutral, accent) = if a.is_neutral() { (a, b) } else { (b, a) };
            format!("{} is a neutral that anchors the {}.", capitalize(neutral.to_string().as_str()), accent)
        }
        Harmony::Complementary => format!(
            "{} and {} are complementary colors, so they contrast without clashing.",
            capitalize(a.to_string().as_str()),
            b
        ),
        Harmony::Analogous => format!(
            "{} and {} sit next to each other on the color wheel and blend naturally.",
            capitalize(a.to_string().as_str()),
            b
        ),
    }
}

fn formality_reason(a: whatrobe_core::Formality, b: whatrobe_core::Formality) -> String {
    match formality::gap(a, b) {
        0 => format!("Both pieces share the same {} formality.", a),
        1 => format!("The {} and {} pieces are one formality step apart.", a, b),
        n => format!("The {} and {} pieces are {} formality steps apart.", a, b, n),
    }
}

/// "a black top", "white bottoms", "an orange accessory"
fn piece(item: &ClothingItem) -> String {
    let phrase = format!("{} {}", item.color, item.category.noun());
    match item.category {
        Category::Bottoms | Category::Shoes | Category::Jewelry => phrase,
        _ if phrase.starts_with(['a', 'e', 'i', 'o', 'u']) => format!("an {}", phrase),
        _ => format!("a {}", phrase),
    }
}

fn join_list(parts: &[String]) -> String {
    match parts {
        [] => String::new(),
        [one] => one.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use whatrobe_core::{Fit, Formality, Style};

    fn item(id: &str, category: Category, color: Color) -> ClothingItem {
        ClothingItem::new(id, category, color, Style::Casual, Fit::Regular)
    }

    #[test]
    fn test_names() {
        let prefs = Preferences {
            occasion: "dinner".to_string(),
            style: "minimalist".to_string(),
            weather: "cool".to_string(),
        };
        assert_eq!(outfit_name(&prefs), "Minimalist dinner Outfit");
        assert_eq!(dress_name(&prefs), "Elegant dinner Dress");
    }

    #[test]
    fn test_describe_items() {
        let top = item("t", Category::Tops, Color::Black);
        let bottom = item("b", Category::Bottoms, Color::White);
        let shoes = item("s", Category::Shoes, Color::White);
        let coat = item("o", Category::Outerwear, Color::Orange);

        assert_eq!(describe_items(&[&top, &bottom]), "A black top with white bottoms.");
        assert_eq!(
            describe_items(&[&top, &bottom, &shoes, &coat]),
            "A black top with white bottoms, white shoes and an orange outer layer."
        );
    }

    #[test]
    fn test_separates_reason_names_rules() {
        let policy = CompatibilityPolicy::standard();
        let top = item("t", Category::Tops, Color::Red).with_formality(Formality::SmartCasual);
        let bottom = item("b", Category::Bottoms, Color::Green).with_formality(Formality::Casual);
        let coat = item("o", Category::Outerwear, Color::Gray);

        let reason = explain_separates(&policy, &top, &bottom, None, Some(&coat), "cold");
        assert!(reason.contains("Red and green are complementary"));
        assert!(reason.contains("one formality step apart"));
        assert!(reason.contains("A gray outer layer adds warmth for cold weather."));
    }

    #[test]
    fn test_color_reasons() {
        assert!(color_reason(Harmony::Neutral, Color::Blue, Color::Gray).starts_with("Gray is a neutral that anchors the blue"));
        assert!(color_reason(Harmony::Neutral, Color::Black, Color::White).contains("neutrals"));
        assert!(color_reason(Harmony::Identical, Color::Navy, Color::Navy).contains("navy"));
    }

    #[test]
    fn test_dress_reason() {
        let policy = CompatibilityPolicy::standard();
        let dress = item("d", Category::Dresses, Color::Navy);
        let shoes = item("s", Category::Shoes, Color::Beige);
        let reason = explain_dress(&policy, &dress, Some(&shoes));
        assert!(reason.starts_with("Dresses provide an elegant"));
        assert!(reason.contains("complementary"));
    }
}

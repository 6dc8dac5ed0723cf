//! Prompt templates for each content type.

/// Sentinel that should never appear in real templates.
const ESCAPE_SENTINEL: &str = "\x00LBRACE\x00";
/// Sentinel for escaped closing brace.
const ESCAPE_SENTINEL_CLOSE: &str = "\x00RBRACE\x00";

pub const DESTINATIONS: &str = "\
List {count} travel destinations in the Philippines.
For each one write a numbered heading with the destination name, then:
Overview: two sentences about the place.
Key attractions: a short bulleted list.
Region: Luzon, Visayas or Mindanao.
Tags: comma-separated keywords.";

pub const FOODS: &str = "\
List {count} local dishes a visitor should try in {destination}, Philippines.
For each dish write:
Name: the dish name
Type: main dish, snack, dessert or drink
Description: one or two sentences
Price: typical price range in pesos
Tags: comma-separated keywords";

pub const PLACES: &str = "\
List {count} places to visit in {destination}, Philippines.
For each place write a numbered heading with its name, then:
Type: the kind of attraction
Location: barangay, town or city
Description: one or two sentences
Tags: comma-separated keywords";

pub const EVENTS: &str = "\
List {count} festivals or events held in {destination}, Philippines.
For each event write a numbered heading with its name, then:
Date: when it takes place
Venue: where it is held
Description: one or two sentences
Tags: comma-separated keywords";

pub const ITINERARY: &str = "\
Plan a {days}-day trip to {destination}, Philippines.
Start with a title line: # <title>
For each day write a heading like \"Day 1: <theme>\", then one line per stop
beginning with a clock time, for example \"8:00 AM Visit <place>\".
Under a stop you may add a description, \"Entrance fee: <amount>\" and
\"Duration: <length>\".";

/// Build a prompt string with variable substitution.
///
/// Replaces `{key}` placeholders in the template with the matching value
/// from `vars`. Unknown placeholders are left as written.
///
/// Use `{{` to insert a literal `{` and `}}` to insert a literal `}`.
///
/// # Example
///
/// ```
/// use travel_content::prompt::render;
///
/// let result = render("Trip to {destination}, JSON: {{\"days\": 2}}", &[("destination", "Cebu")]);
/// assert_eq!(result, r#"Trip to Cebu, JSON: {"days": 2}"#);
/// ```
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    // Pass 1: protect escaped braces
    let mut rendered = template.replace("{{", ESCAPE_SENTINEL);
    rendered = rendered.replace("}}", ESCAPE_SENTINEL_CLOSE);

    // Pass 2: substitute placeholders
    for (key, value) in vars {
        let placeholder = format!("{{{}}}", key);
        rendered = rendered.replace(&placeholder, value);
    }

    // Pass 3: restore escaped braces
    rendered = rendered.replace(ESCAPE_SENTINEL, "{");
    rendered = rendered.replace(ESCAPE_SENTINEL_CLOSE, "}");
    rendered
}

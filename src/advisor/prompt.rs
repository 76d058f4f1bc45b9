//! Natural-language templates for the opening turn and the illustration.

/// Opening user turn embedding the location and the activity verbatim.
pub fn recommendation_prompt(location: &str, activity: &str) -> String {
    format!(
        "What's the weather like in {location} and what's the air pressure and wind speed there? \
         I want to perform the following activity {activity}, can you suggest an outfit for me?"
    )
}

/// Image prompt asking for the clothing described in `recommendation`.
pub fn illustration_prompt(recommendation: &str) -> String {
    format!(
        "Generate an image of clothing as defined below. Take care to make it as realistic as possible. \
         Do not miss any of the clothing gear, check to see that everything is included in the image: \n\
         {recommendation}"
    )
}

//! Markdown rendering

use crate::usecase::UseCase;

fn bullets(out: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("\n**{}:**\n", heading));
    for item in items {
        out.push_str(&format!("- {}\n", item));
    }
}

pub fn usecase(uc: &UseCase) -> String {
    let mut s = String::new();
    s.push_str(&format!("# {}\n\n", uc.title));
    s.push_str(&format!("**ID:** `{}`\n", uc.id));
    s.push_str(&format!("**Input:** {}\n", uc.input));
    s.push_str(&format!("**Category:** {}\n\n", uc.category));
    s.push_str(&uc.description);
    s.push('\n');

    bullets(&mut s, "Tags", &uc.tags);
    bullets(&mut s, "Personas", &uc.persona_relevance);
    bullets(&mut s, "Potential customers", &uc.potential_customers);
    bullets(&mut s, "Beneficiaries", &uc.beneficiaries);
    bullets(&mut s, "Outputs", &uc.outputs);

    let modules = uc.integration.enabled_modules();
    s.push_str(&format!(
        "\n**Integration:** {}\n",
        if modules.is_empty() { "none".to_string() } else { modules.join(", ") }
    ));

    if let Some(ref demo) = uc.demo_asset {
        s.push_str(&format!("**Demo:** {}\n", demo));
    }
    if let Some(ref video) = uc.video_url {
        s.push_str(&format!("**Video:** {}\n", video));
    }

    s
}

pub fn list(usecases: &[&UseCase]) -> String {
    let mut s = String::new();
    s.push_str("| ID | Title | Input | Category |\n");
    s.push_str("|----|-------|-------|----------|\n");
    for uc in usecases {
        s.push_str(&format!("| `{}` | {} | {} | {} |\n", uc.id, uc.title, uc.input, uc.category));
    }
    s.push_str(&format!("\n{} use case(s)\n", usecases.len()));
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::usecase::InputModality;

    #[test]
    fn test_usecase_markdown() {
        let mut uc = fixtures::usecase("a", InputModality::Sensors, "Smart City");
        uc.tags = vec!["Air".into()];
        uc.integration.pulse = true;
        let md = usecase(&uc);
        assert!(md.starts_with("# Title a\n"));
        assert!(md.contains("**Input:** Sensors (IoT, GIS)"));
        assert!(md.contains("- Air"));
        assert!(md.contains("**Integration:** pulse"));
        assert!(!md.contains("**Demo:**"));
    }

    #[test]
    fn test_list_markdown() {
        let a = fixtures::usecase("a", InputModality::Visual, "Public Safety");
        let md = list(&[&a]);
        assert!(md.contains("| `a` | Title a | Visual | Public Safety |"));
        assert!(md.ends_with("1 use case(s)\n"));
    }
}

use crate::domain::model::{sort_by_display_order, Skill, SkillCategory};
use std::collections::HashMap;

/// 依 category 分組：分類依第一次出現的順序，分類內依 display_order 排序
pub fn group_skills_by_category(skills: &[Skill]) -> Vec<SkillCategory> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut buckets: Vec<(String, Vec<Skill>)> = Vec::new();

    for skill in skills {
        let slot = *index.entry(skill.category.as_str()).or_insert_with(|| {
            buckets.push((skill.category.clone(), Vec::new()));
            buckets.len() - 1
        });
        buckets[slot].1.push(skill.clone());
    }

    buckets
        .into_iter()
        .map(|(category, members)| SkillCategory {
            category,
            skills: sort_by_display_order(members),
        })
        .collect()
}

pub fn flatten_categories(categories: &[SkillCategory]) -> Vec<Skill> {
    categories
        .iter()
        .flat_map(|c| c.skills.iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(id: i64, category: &str, order: i32, name: &str) -> Skill {
        Skill {
            id,
            name: name.to_string(),
            category: category.to_string(),
            proficiency_level: None,
            display_order: order,
            created_at: None,
            updated_at: None,
        }
    }

    fn names(category: &SkillCategory) -> Vec<&str> {
        category.skills.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_groups_in_first_seen_order() {
        let skills = vec![
            skill(1, "Languages", 2, "Go"),
            skill(2, "Languages", 1, "Rust"),
            skill(3, "Tools", 1, "Git"),
        ];

        let grouped = group_skills_by_category(&skills);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].category, "Languages");
        assert_eq!(names(&grouped[0]), vec!["Rust", "Go"]);
        assert_eq!(grouped[1].category, "Tools");
        assert_eq!(names(&grouped[1]), vec!["Git"]);
    }

    #[test]
    fn test_interleaved_categories() {
        let skills = vec![
            skill(1, "Backend", 1, "FastAPI"),
            skill(2, "Frontend", 2, "Tailwind"),
            skill(3, "Backend", 0, "PostgreSQL"),
            skill(4, "Frontend", 1, "React"),
        ];

        let grouped = group_skills_by_category(&skills);

        assert_eq!(grouped[0].category, "Backend");
        assert_eq!(names(&grouped[0]), vec!["PostgreSQL", "FastAPI"]);
        assert_eq!(grouped[1].category, "Frontend");
        assert_eq!(names(&grouped[1]), vec!["React", "Tailwind"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(group_skills_by_category(&[]).is_empty());
    }

    #[test]
    fn test_grouping_is_idempotent() {
        let orderings = vec![
            vec![
                skill(1, "Tools", 3, "Docker"),
                skill(2, "Languages", 2, "Python"),
                skill(3, "Tools", 1, "Git"),
                skill(4, "Languages", 2, "TypeScript"),
                skill(5, "Cloud", 1, "Azure"),
            ],
            vec![
                skill(5, "Cloud", 1, "Azure"),
                skill(4, "Languages", 2, "TypeScript"),
                skill(3, "Tools", 1, "Git"),
                skill(2, "Languages", 2, "Python"),
                skill(1, "Tools", 3, "Docker"),
            ],
        ];

        for skills in orderings {
            let once = group_skills_by_category(&skills);
            let twice = group_skills_by_category(&flatten_categories(&once));
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_equal_display_order_keeps_input_order() {
        let skills = vec![
            skill(1, "Languages", 2, "Python"),
            skill(2, "Languages", 2, "TypeScript"),
        ];
        let grouped = group_skills_by_category(&skills);
        assert_eq!(names(&grouped[0]), vec!["Python", "TypeScript"]);
    }
}

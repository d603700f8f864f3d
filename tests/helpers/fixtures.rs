use coursefind::Record;

/// Create a course with only the fields a test cares about
pub fn course(id: i64, title: &str, category: &str, instructor: &str, description: &str) -> Record {
    Record {
        id,
        title: title.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        price: 25.0,
        instructor: instructor.to_string(),
    }
}

/// A small catalog covering every scored field
pub fn sample_catalog() -> Vec<Record> {
    vec![
        course(1, "Advanced Go", "Programming", "Rob Pike", "A great intro to concurrency"),
        course(2, "Intro to Go", "Systems", "Ken Thompson", "Start here"),
        course(3, "React Hooks", "Web", "Dan Abramov", "State and effects"),
        course(4, "Data Pipelines", "Data", "Data Dave", "Batch and stream"),
        course(5, "Watercolor Basics", "Art", "Bob Ross", "Happy little trees"),
    ]
}

/// `count` courses that all match "python" through the description only
pub fn python_flood(count: i64) -> Vec<Record> {
    (0..count)
        .map(|i| course(1000 + i, &format!("Notebook {}", i), "Misc", "", "uses python"))
        .collect()
}

//! Prompt templates for listing optimization.

use super::models::ProductSnapshot;

pub const OPTIMIZER_SYSTEM_PROMPT: &str = "You are an expert Amazon product listing optimizer \
with deep knowledge of SEO, copywriting, and Amazon's content policies. Always respond with valid JSON.";

const OPTIMIZER_GUIDELINES: &str = r#"Please provide optimized content following these guidelines:

1. OPTIMIZED TITLE (max 200 characters):
   - Include primary keywords naturally
   - Make it readable and compelling
   - Follow Amazon's title guidelines
   - Do not use ALL CAPS or promotional language

2. OPTIMIZED BULLET POINTS (5 points):
   - Start each with a benefit or key feature
   - Be clear, concise, and scannable
   - Highlight product value propositions
   - Use proper grammar and punctuation
   - Keep each point under 250 characters

3. OPTIMIZED DESCRIPTION (200-300 words):
   - Engaging opening that hooks the reader
   - Explain benefits and use cases
   - Address potential customer concerns
   - Include a call to action
   - Avoid unsubstantiated claims, medical claims, or superlatives without proof
   - Maintain compliance with Amazon's content policy

4. KEYWORD SUGGESTIONS (3-5 keywords):
   - Relevant search terms customers might use
   - Include long-tail keywords
   - SEO-focused for Amazon search

Format your response as JSON:
{
  "title": "optimized title here",
  "bulletPoints": ["point 1", "point 2", "point 3", "point 4", "point 5"],
  "description": "optimized description here",
  "keywords": ["keyword1", "keyword2", "keyword3", "keyword4", "keyword5"]
}"#;

/// Build the user prompt embedding the scraped listing verbatim.
pub fn build_optimization_prompt(snapshot: &ProductSnapshot) -> String {
    let bullets = snapshot
        .bullet_points
        .iter()
        .enumerate()
        .map(|(i, bullet)| format!("{}. {}", i + 1, bullet))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are an expert Amazon product listing optimizer. Analyze and optimize the following product listing.\n\n\
         Original Title: {}\n\n\
         Original Bullet Points:\n{}\n\n\
         Original Description:\n{}\n\n\
         {}",
        snapshot.title, bullets, snapshot.description, OPTIMIZER_GUIDELINES
    )
}

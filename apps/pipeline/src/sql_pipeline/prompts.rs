// All prompt constants for the SQL pipeline: the database-schema system
// prompt and the few-shot steering examples sent before the real question.

/// System prompt carrying the task instructions and the full database schema.
pub const SQL_SYSTEM_PROMPT: &str = r#"You are an expert in SQLite databases and data analysis.
You are given a database schema and a question, and you must provide the correct SQL query that answers the question.
Provide the SQL query only, without newlines, and make sure it is correct.
Explain your reasoning in 1-3 steps, then provide the final SQL query.
The database schema is attached below. Note the relationships between tables and the data types of each column.
The database schema is as follows:

erDiagram
    orders || --o{
            order_items: contains
    orders || --o{
            order_payments: has
    orders || --o{
            order_reviews: has
    orders
        } | --|| customers : placed_by
    order_items } | --|| products : includes
    order_items }| --|| sellers : sold_by
sellers }| --|| geolocation : located_in
customers }| --|| geolocation : located_in

    orders {
        string order_id
        string customer_id
        string order_status
        datetime order_purchase_timestamp
        datetime order_approved_at
        datetime order_delivered_carrier_date
        datetime order_delivered_customer_date
        datetime order_estimated_delivery_date
}

    order_items {
        string order_id
        int order_item_id
        string product_id
        string seller_id
        datetime shipping_limit_date
        float price
        float freight_value
}

    order_payments {
        string order_id
        int payment_sequential
        string payment_type
        int payment_installments
        float payment_value
}

    order_reviews {
        string review_id
        string order_id
        int review_score
        string review_comment_title
        string review_comment_message
        datetime review_creation_date
        datetime review_answer_timestamp
}

    customers {
        string customer_id
        string customer_unique_id
        string customer_zip_code_prefix
        string customer_city
        string customer_state
}

    sellers {
        string seller_id
        string seller_zip_code_prefix
        string seller_city
        string seller_state
}

    products {
        string product_id
        string product_category_name
        int product_name_length
        int product_description_length
        int product_photos_qty
        float product_weight_g
        float product_length_cm
        float product_height_cm
        float product_width_cm
}

    geolocation {
        string geolocation_zip_code_prefix
        float geolocation_lat
        float geolocation_lng
        string geolocation_city
        string geolocation_state

}"#;

/// Question/answer pairs appended as alternating user/assistant turns to
/// steer the output style before the real question is asked.
pub const FEW_SHOT_EXAMPLES: &[(&str, &str)] = &[
    (
        "Which seller has delivered the most orders to customers in Rio de Janeiro? [string: seller_id]",
        "SELECT s.seller_id, COUNT(*) AS order_count FROM orders o JOIN customers c ON o.customer_id = c.customer_id JOIN sellers s ON o.seller_id = s.seller_id WHERE c.customer_city = 'rio de janeiro' AND o.order_status = 'delivered' GROUP BY s.seller_id ORDER BY order_count DESC LIMIT 1;",
    ),
    (
        "What's the average review score for 'beleza_saude' products?",
        "SELECT AVG(r.review_score) AS avg_score FROM order_reviews r JOIN order_items oi ON r.order_id = oi.order_id JOIN products p ON oi.product_id = p.product_id WHERE p.product_category_name = 'beleza_saude';",
    ),
];

/// The built-in batch, used when no `--question` flags are given.
pub const DEFAULT_QUESTIONS: &[&str] = &[
    "Which seller has delivered the most orders to customers in Rio de Janeiro? [string: seller_id]",
    "What's the average review score for products in the 'beleza_saude' category? [float: score]",
    "How many sellers have completed orders worth more than 100,000 BRL in total? [integer: count]",
    "Which product category has the highest rate of 5-star reviews? [string: category_name]",
    "What's the most common payment installment count for orders over 1000 BRL? [integer: installments]",
    "Which city has the highest average freight value per order? [string: city_name]",
    "What's the most expensive product category based on average price? [string: category_name]",
    "Which product category has the shortest average delivery time? [string: category_name]",
    "How many unique customers have placed orders in the state of Sao Paulo? [integer: count]",
    "What percentage of orders are delivered before the estimated delivery date? [float: percentage]",
];

mod category_create_name_idx;
mod category_create_table;
mod cook_create_table;
mod meal_create_category_id_idx;
mod meal_create_slug_idx;
mod meal_create_table;
mod user_create_table;
mod user_create_username_idx;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "main",
    "m0_1",
    vec_box![],
    vec_box![
        user_create_table::Operation,
        user_create_username_idx::Operation,
        category_create_table::Operation,
        category_create_name_idx::Operation,
        meal_create_table::Operation,
        meal_create_slug_idx::Operation,
        meal_create_category_id_idx::Operation,
        cook_create_table::Operation,
    ]
);

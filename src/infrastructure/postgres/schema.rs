diesel::table! {
    subscription (id) {
        id -> Uuid,
        user_id -> Uuid,
        service_name -> Varchar,
        price -> Int4,
        start_date -> Date,
        end_date -> Nullable<Date>,
    }
}

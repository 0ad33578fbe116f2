
use agrocert_persistence::migrations::run_pending_migrations;
use diesel::RunQueryDsl;
use test_support::with_pool;

// Las migraciones ya corrieron al construir el pool; una segunda pasada no
// aplica nada y las tablas existen.
#[test]
fn migrations_are_idempotent() {
    let ran = with_pool(|pool| {
        let mut conn = pool.get().expect("conn");
        run_pending_migrations(&mut conn).expect("second run");
        diesel::sql_query("SELECT 1 FROM inspection_records LIMIT 1").execute(&mut conn)
                                                                       .expect("tabla raíz");
        diesel::sql_query("SELECT 1 FROM crop_managements LIMIT 1").execute(&mut conn)
                                                                     .expect("tabla manejo");
    });
    if ran.is_none() {
        eprintln!("skip (no DATABASE_URL)");
    }
}

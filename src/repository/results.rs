use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::Result;
use crate::models::{OrderHeader, PatientOrderRow, ResultRow, ResultSource, ResultStatistics};

/// Result rows joined with their catalog entries. The inner joins drop rows
/// whose test, procedure, group or billing code cannot be resolved.
const RESULT_ROWS_SQL: &str = r#"
    SELECT
        r.id AS result_id,
        r.fecha AS result_date,
        r.id_orden AS order_id,
        proc.id AS procedure_id,
        r.id_prueba AS test_id,
        r.id_pruebaopcion AS option_id,
        r.res_opcion AS option_value,
        r.res_numerico::float8 AS numeric_value,
        r.res_texto AS text_value,
        r.res_memo AS memo_value,
        r.num_procesamientos AS processing_count,

        pr.codigo_prueba AS test_code,
        pr.nombre_prueba AS test_name,
        pr.id_tipo_resultado AS result_type_id,
        pr.unidad AS unit,
        pr.habilita::boolean AS test_enabled,

        proc.id_cups AS cups_id,
        proc.metodo AS method,

        g.id AS group_id,
        g.codigo AS group_code,
        g.nombre AS group_name,
        g.habilita::boolean AS group_enabled,

        cups.codigo AS cups_code,
        cups.nombre AS cups_name,
        cups.habilita::boolean AS cups_enabled,

        po.opcion AS option_label,
        po.valor_ref_min_m::float8 AS ref_min_male,
        po.valor_ref_max_m::float8 AS ref_max_male,
        po.valor_ref_min_f::float8 AS ref_min_female,
        po.valor_ref_max_f::float8 AS ref_max_female
    FROM lab_m_orden_resultados r
    INNER JOIN lab_p_pruebas pr ON r.id_prueba = pr.id
    INNER JOIN lab_p_procedimientos proc ON r.id_procedimiento = proc.id
    INNER JOIN lab_p_grupos g ON proc.id_grupo_laboratorio = g.id
    INNER JOIN fac_p_cups cups ON proc.id_cups = cups.id
    LEFT JOIN lab_p_pruebas_opciones po ON r.id_pruebaopcion = po.id
    WHERE r.id_orden = $1
    ORDER BY g.nombre, cups.nombre, pr.nombre_prueba
"#;

const STATISTICS_SQL: &str = r#"
    SELECT
        COUNT(*) AS total_results,
        COUNT(DISTINCT r.id_procedimiento) AS total_procedures,
        COUNT(DISTINCT proc.id_grupo_laboratorio) AS total_groups,
        COUNT(DISTINCT CASE WHEN r.res_numerico IS NOT NULL THEN r.id END) AS numeric_results,
        COUNT(DISTINCT CASE WHEN r.res_opcion IS NOT NULL THEN r.id END) AS option_results,
        COUNT(DISTINCT CASE WHEN r.res_texto IS NOT NULL THEN r.id END) AS text_results,
        COUNT(DISTINCT CASE WHEN r.res_memo IS NOT NULL THEN r.id END) AS memo_results
    FROM lab_m_orden_resultados r
    INNER JOIN lab_p_procedimientos proc ON r.id_procedimiento = proc.id
    WHERE r.id_orden = $1
"#;

const PATIENT_ORDER_SQL: &str = r#"
    SELECT
        o.id AS order_id,
        o.orden::text AS order_number,
        o.fecha AS order_date,
        t.id AS patient_card_id,
        o.profesional_externo AS external_professional,

        p.id AS patient_id,
        p.numeroid AS document_number,
        p.nombre1 AS first_name,
        p.nombre2 AS middle_name,
        p.apellido1 AS last_name,
        p.apellido2 AS second_last_name,
        p.fechanac AS birth_date,
        p.direccion AS address,
        p.tel_movil AS mobile_phone,
        p.email AS email,

        doc.codigo AS document_type_code,
        doc.nombre AS document_type_name,
        eps.codigo AS insurer_code,
        eps.razonsocial AS insurer_name,
        sexo.nombre AS sex_description,

        prof_p.nombre1 AS prof_first_name,
        prof_p.nombre2 AS prof_middle_name,
        prof_p.apellido1 AS prof_last_name,
        prof_p.apellido2 AS prof_second_last_name,
        prof.registro_medico AS prof_medical_registry
    FROM lab_m_orden o
    LEFT JOIN fac_m_tarjetero t ON o.id_historia = t.id
    LEFT JOIN gen_m_persona p ON t.id_persona = p.id
    LEFT JOIN gen_p_documento doc ON p.id_tipoid = doc.id
    LEFT JOIN gen_p_eps eps ON t.id_eps = eps.id
    LEFT JOIN gen_p_listaopcion sexo ON p.id_sexobiologico = sexo.id AND sexo.variable = 'SexoBiologico'
    LEFT JOIN fac_p_profesional prof ON o.id_profesional_ordena = prof.id
    LEFT JOIN gen_m_persona prof_p ON prof.id_persona = prof_p.id
    WHERE o.id = $1
"#;

pub struct ResultsRepository {
    pool: PgPool,
}

impl ResultsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResultSource for ResultsRepository {
    async fn find_order(&self, order_id: i32) -> Result<Option<OrderHeader>> {
        let order = sqlx::query_as::<_, OrderHeader>(
            r#"
            SELECT id, orden::text AS number, fecha AS date, profesional_externo AS external_professional
            FROM lab_m_orden
            WHERE id = $1
            "#,
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    async fn result_rows(&self, order_id: i32) -> Result<Vec<ResultRow>> {
        let rows = sqlx::query_as::<_, ResultRow>(RESULT_ROWS_SQL)
            .bind(order_id)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(order_id, rows = rows.len(), "Fetched result rows");
        Ok(rows)
    }

    async fn raw_result_count(&self, order_id: i32) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM lab_m_orden_resultados WHERE id_orden = $1")
                .bind(order_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    async fn statistics(&self, order_id: i32) -> Result<ResultStatistics> {
        // An aggregate without GROUP BY always yields one row, zeros included.
        let stats = sqlx::query_as::<_, ResultStatistics>(STATISTICS_SQL)
            .bind(order_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(stats)
    }

    async fn patient_order_row(&self, order_id: i32) -> Result<Option<PatientOrderRow>> {
        let row = sqlx::query_as::<_, PatientOrderRow>(PATIENT_ORDER_SQL)
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }
}
